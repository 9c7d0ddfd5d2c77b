//! Handling of a single "service finished" notification.
//!
//! The flow is: load the remote configuration, skip the notification if an event with
//! the same (package, service, outcome) is already recorded, otherwise upsert the
//! package and its event and, on `SUCCESS`, ask the next pipeline service to start.
//!
//! Deduplication is a read-then-write check against the Zodiac API. Two concurrent
//! invocations for the same notification can both pass it and both write, the check
//! is best-effort only.

use anyhow::{anyhow, Context};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::{
    app::{
        context::GlobalContext,
        error::{Error, ErrorExt, ErrorKind},
        model::{Attributes, EventPayload, Outcome, PackageEvent, PackagePayload, SnsEnvelope},
        route::NextServiceMap,
        settings::{get_config, ServiceConfig},
    },
    client::{
        sns::{Publisher, StartServiceMessage},
        zodiac::{ZodiacClient, ZodiacHttpClient},
    },
};

////////////////////////////////////////////////////////////////////////////////

#[tracing::instrument(
    skip_all,
    fields(package_id = tracing::field::Empty, service = tracing::field::Empty)
)]
pub(crate) async fn handle(ctx: &dyn GlobalContext, envelope: SnsEnvelope) -> Result<(), Error> {
    tracing::info!("Message received");

    let params = get_config(ctx.parameter_store(), &ctx.config().parameter_path()).await?;
    let service_config = ServiceConfig::try_from(&params)?;

    let attributes = Attributes::from_envelope(&envelope)?;
    let span = tracing::Span::current();
    span.record("package_id", &tracing::field::display(&attributes.package_id));
    span.record("service", &tracing::field::display(&attributes.service));
    tracing::debug!(?attributes);

    let zodiac = ZodiacHttpClient::new(ctx.http().clone(), &service_config.zodiac_baseurl)
        .context("Invalid ZODIAC_BASEURL")
        .error(ErrorKind::ConfigInvalid)?;

    process(
        &zodiac,
        ctx.publisher(),
        ctx.routes(),
        &service_config,
        &attributes,
    )
    .await
}

async fn process(
    zodiac: &dyn ZodiacClient,
    publisher: &dyn Publisher,
    routes: &NextServiceMap,
    service_config: &ServiceConfig,
    attributes: &Attributes,
) -> Result<(), Error> {
    let duplicates = matching_events(
        zodiac,
        &attributes.package_id,
        &attributes.service,
        Some(&attributes.outcome),
    )
    .await?;

    if !duplicates.is_empty() {
        tracing::info!(outcome = %attributes.outcome, "Duplicate event found");
        return Ok(());
    }

    update_package(zodiac, attributes).await?;
    update_events(zodiac, attributes).await?;

    if attributes.outcome.is_success() {
        send_next_service_message(
            publisher,
            routes,
            &service_config.service_start_sns_topic,
            &attributes.service,
            &attributes.package_id,
        )
        .await?;
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////

/// Events recorded for `package_id` that were produced by `service` and, when given,
/// ended with `outcome`.
pub(crate) async fn matching_events(
    zodiac: &dyn ZodiacClient,
    package_id: &str,
    service: &str,
    outcome: Option<&Outcome>,
) -> Result<Vec<PackageEvent>, Error> {
    let body = zodiac
        .read(&format!("/packages/{}/events", package_id))
        .await
        .context("Failed to list package events")
        .error(ErrorKind::ZodiacRequestFailed)?;

    let events = serde_json::from_value::<Vec<JsonValue>>(body)
        .context("Failed to parse package events")
        .error(ErrorKind::ZodiacRequestFailed)?;

    // Events of other services are skipped before decoding, whatever their shape.
    let events = events
        .into_iter()
        .filter(|event| event.get("service").and_then(JsonValue::as_str) == Some(service))
        .map(|event| {
            serde_json::from_value::<PackageEvent>(event)
                .context("Failed to parse package event")
                .error(ErrorKind::ZodiacRequestFailed)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events
        .into_iter()
        .filter(|event| {
            outcome.map_or(true, |outcome| {
                event.outcome.as_deref() == Some(outcome.as_str())
            })
        })
        .collect())
}

pub(crate) async fn update_package(
    zodiac: &dyn ZodiacClient,
    attributes: &Attributes,
) -> Result<(), Error> {
    let payload = to_json(&PackagePayload::from(attributes))?;

    zodiac
        .write("/packages", &payload)
        .await
        .context("Failed to update package")
        .error(ErrorKind::ZodiacRequestFailed)
}

/// Creates the event of (package, service) or overwrites the existing one with the
/// current outcome.
pub(crate) async fn update_events(
    zodiac: &dyn ZodiacClient,
    attributes: &Attributes,
) -> Result<(), Error> {
    let events = matching_events(zodiac, &attributes.package_id, &attributes.service, None).await?;
    tracing::debug!(?events);

    let identifier = match events.as_slice() {
        [] => construct_event_id(),
        [event] => event
            .identifier
            .clone()
            .ok_or_else(|| {
                anyhow!(
                    "Event of package {} has no identifier",
                    attributes.package_id
                )
            })
            .error(ErrorKind::ZodiacRequestFailed)?,
        events => {
            return Err(anyhow!(
                "Got more than one matching event for package {}, found {}",
                attributes.package_id,
                events.len()
            ))
            .error(ErrorKind::DuplicateEvents)
        }
    };

    let payload = to_json(&EventPayload {
        outcome: attributes.outcome.as_str(),
        service: &attributes.service,
        package: &attributes.package_id,
        identifier,
    })?;

    zodiac
        .write("/events", &payload)
        .await
        .context("Failed to update event")
        .error(ErrorKind::ZodiacRequestFailed)
}

pub(crate) fn construct_event_id() -> String {
    Uuid::new_v4().to_string()
}

/// Publishes a start request for the service following `current_service`.
/// A service without a successor is a terminal stage and publishes nothing.
pub(crate) async fn send_next_service_message(
    publisher: &dyn Publisher,
    routes: &NextServiceMap,
    topic_arn: &str,
    current_service: &str,
    package_id: &str,
) -> Result<(), Error> {
    let next_service = match routes.next(current_service) {
        Some(next_service) => next_service,
        None => {
            tracing::info!("No next service found for {}", current_service);
            return Ok(());
        }
    };

    tracing::info!("Starting service {}", next_service);

    let message = StartServiceMessage {
        package_id: package_id.to_owned(),
        service: next_service.to_owned(),
    };

    publisher
        .publish(topic_arn, &message)
        .await
        .context("Failed to publish start service message")
        .error(ErrorKind::PublishFailed)?;

    tracing::info!(
        "Message to start service {} for package {} sent",
        next_service,
        package_id
    );

    Ok(())
}

fn to_json<T: serde::Serialize>(payload: &T) -> Result<JsonValue, Error> {
    serde_json::to_value(payload)
        .context("Failed to serialize payload")
        .error(ErrorKind::MessageBuildingFailed)
}
