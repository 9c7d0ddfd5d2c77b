use std::collections::HashMap;

/// Pipeline topology: which service runs after a service completed successfully.
#[derive(Clone, Debug)]
pub(crate) struct NextServiceMap(HashMap<String, String>);

impl NextServiceMap {
    pub(crate) fn new<I, K, V>(routes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            routes
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }

    /// `None` marks a terminal stage.
    pub(crate) fn next(&self, service: &str) -> Option<&str> {
        self.0.get(service).map(String::as_str)
    }
}

impl Default for NextServiceMap {
    fn default() -> Self {
        Self::new([("ursa_major", "fornax"), ("webhook", "aquarius")])
    }
}
