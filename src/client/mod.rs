pub mod aws;
pub mod sns;
pub mod ssm;
pub mod zodiac;
