// capture/linux.rs - Linux Screen Capture via xdg-desktop-portal
//
// Calls org.freedesktop.portal.Screenshot.Screenshot on the session bus and
// waits for the single Response signal on the returned request object.
// The portal shows its own picker/permission UI and stores the file; we only
// report the URI it hands back.

use std::collections::HashMap;

use futures::StreamExt;
use log::{debug, info, warn};
use zbus::proxy::SignalStream;
use zbus::zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};
use zbus::Connection;

use super::portal::{PortalStatus, ScreenshotResponse};
use crate::constants::portal;
use crate::error::CaptureError;

/// Ask the portal for a screenshot and block until it answers.
///
/// Runs a single-threaded runtime as the event loop for the one exchange.
pub fn request_screenshot(interactive: bool) -> Result<String, CaptureError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(runtime_failed)?;

    runtime.block_on(screenshot_via_portal(interactive))
}

async fn screenshot_via_portal(interactive: bool) -> Result<String, CaptureError> {
    let connection = Connection::session()
        .await
        .map_err(|e| CaptureError::NoDisplayBus(e.to_string()))?;
    info!("Connected to session bus");

    let token = handle_token();
    let expected = connection
        .unique_name()
        .map(|name| request_path(name.as_str(), &token));

    // Subscribe before calling so a portal that answers immediately
    // cannot beat us to the signal.
    let mut responses = match &expected {
        Some(path) => Some(subscribe(&connection, object_path(path)?).await?),
        None => None,
    };

    let screenshot = zbus::Proxy::new(
        &connection,
        portal::DESTINATION,
        portal::PATH,
        portal::SCREENSHOT_INTERFACE,
    )
    .await
    .map_err(|e| CaptureError::PortalCallRejected(e.to_string()))?;

    let mut options: HashMap<&str, Value<'_>> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));
    options.insert("interactive", Value::from(interactive));
    // Some portal builds read the capitalised key
    options.insert("Interactive", Value::from(interactive));

    info!("Requesting screenshot from portal (interactive={})", interactive);
    let handle: OwnedObjectPath = screenshot
        .call(portal::SCREENSHOT_METHOD, &("", options))
        .await
        .map_err(|e| CaptureError::PortalCallRejected(e.to_string()))?;
    info!("Portal request handle: {}", handle.as_str());

    if expected.as_deref() != Some(handle.as_str()) {
        // Older portals ignore handle_token and pick their own path
        warn!(
            "Portal returned handle {} instead of {:?}, re-subscribing",
            handle.as_str(),
            expected
        );
        responses = Some(subscribe(&connection, handle.clone().into_inner()).await?);
    }

    let Some(mut responses) = responses else {
        return Err(CaptureError::PortalCallRejected(
            "no response listener registered".into(),
        ));
    };

    let message = responses.next().await.ok_or_else(|| {
        CaptureError::PortalCallRejected("bus closed before the portal responded".into())
    })?;

    let (code, results): (u32, HashMap<String, OwnedValue>) = message
        .body()
        .deserialize()
        .map_err(|e| CaptureError::PortalCallRejected(format!("malformed response: {e}")))?;
    debug!("Portal responded with code {} and keys {:?}", code, results.keys());

    let response = ScreenshotResponse::new(code, uri_from_results(&results));
    if response.status == PortalStatus::Cancelled {
        info!("Screenshot cancelled in the portal dialog");
    }
    response.into_uri()
}

/// Listen for the single Response signal of one request object
async fn subscribe(
    connection: &Connection,
    path: ObjectPath<'static>,
) -> Result<SignalStream<'static>, CaptureError> {
    debug!("Listening for {} on {}", portal::RESPONSE_SIGNAL, path);
    let request = zbus::Proxy::new(
        connection,
        portal::DESTINATION,
        path,
        portal::REQUEST_INTERFACE,
    )
    .await
    .map_err(|e| CaptureError::PortalCallRejected(e.to_string()))?;

    request
        .receive_signal(portal::RESPONSE_SIGNAL)
        .await
        .map_err(|e| CaptureError::PortalCallRejected(e.to_string()))
}

/// The bus may be fine; only the local runtime could not start
fn runtime_failed(e: std::io::Error) -> CaptureError {
    CaptureError::PortalCallRejected(format!("could not start the portal request runtime: {e}"))
}

fn object_path(path: &str) -> Result<ObjectPath<'static>, CaptureError> {
    ObjectPath::try_from(path.to_owned())
        .map_err(|e| CaptureError::PortalCallRejected(format!("invalid request path {path}: {e}")))
}

fn uri_from_results(results: &HashMap<String, OwnedValue>) -> Option<String> {
    match results.get("uri").map(|value| &**value) {
        Some(Value::Str(uri)) => Some(uri.as_str().to_owned()),
        _ => None,
    }
}

fn handle_token() -> String {
    format!("regionshot_{}", std::process::id())
}

/// Object path the portal uses for a request made by `unique_name` with
/// `token`: the sender's unique name without the leading ':' and with '.'
/// replaced by '_'.
fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("{}/{}/{}", portal::REQUEST_PATH_PREFIX, sender, token)
}
