//! Tauri commands for the link autofill
//!
//! This module contains all Tauri command implementations.

use autolinks_core::{AutolinksError, InputStore, Request, Response, SavedInputs};
use tauri::State;
use tracing::warn;

use crate::AutofillState;

/// Reported when no editor page driver is attached
const WRONG_PAGE: &str = "Error: Make sure you are on the correct page";

/// Dispatch one autofill request to the attached editor page
///
/// # Arguments
/// * `state` - Managed AutofillState from Tauri
/// * `request` - Typed request, tagged by `action`
///
/// # Returns
/// The single response for the request; pipeline failures come back as
/// `type: "error"` responses
///
/// # Errors
/// Returns error message as String if no editor page is attached
#[tauri::command]
pub async fn dispatch(
    state: State<'_, AutofillState>,
    request: Request,
) -> Result<Response, String> {
    if let Some(inputs) = saved_before(&request) {
        save_quietly(&state, &inputs);
    }

    let mut page = state.page.lock().await;
    let Some(page) = page.as_mut() else {
        return Err(AutolinksError::Messaging(WRONG_PAGE.to_string()).to_string());
    };

    let response = state.autofill.dispatch(&mut **page, request.clone()).await;

    if let Some(inputs) = saved_after(&request, &response) {
        save_quietly(&state, &inputs);
    }

    Ok(response)
}

/// Load the last-used links, size and player 2 scripts
///
/// # Errors
/// Returns error message as String if the saved file cannot be read
#[tauri::command]
pub async fn load_saved_inputs(state: State<'_, AutofillState>) -> Result<SavedInputs, String> {
    match &state.store {
        Some(store) => store.load().map_err(|e| e.to_string()),
        None => Ok(SavedInputs::default()),
    }
}

/// Save the links, size and player 2 scripts verbatim
///
/// # Errors
/// Returns error message as String if the file cannot be written
#[tauri::command]
pub async fn save_inputs(
    state: State<'_, AutofillState>,
    inputs: SavedInputs,
) -> Result<(), String> {
    match &state.store {
        Some(store) => store.save(&inputs).map_err(|e| e.to_string()),
        None => Ok(()),
    }
}

/// Inputs to remember before a request runs: the trimmed links and size
pub(crate) fn saved_before(request: &Request) -> Option<SavedInputs> {
    match request {
        Request::ProcessLinks {
            links,
            size,
            player2_scripts,
        }
        | Request::ReplaceAndProcessLinks {
            links,
            size,
            player2_scripts,
        } => Some(SavedInputs {
            saved_links: links.trim().to_string(),
            saved_size: size.trim().to_string(),
            saved_player2_scripts: player2_scripts.clone().unwrap_or_default(),
        }),
        Request::TestClick => None,
    }
}

/// Inputs to remember after a request: the renumbered links of a
/// successful replace, nothing otherwise
pub(crate) fn saved_after(request: &Request, response: &Response) -> Option<SavedInputs> {
    let Request::ReplaceAndProcessLinks {
        size,
        player2_scripts,
        ..
    } = request
    else {
        return None;
    };

    if !response.is_success() {
        return None;
    }

    response.replaced_links.as_ref().map(|replaced| SavedInputs {
        saved_links: replaced.clone(),
        saved_size: size.clone(),
        saved_player2_scripts: player2_scripts.clone().unwrap_or_default(),
    })
}

fn save_quietly(state: &AutofillState, inputs: &SavedInputs) {
    if let Some(store) = &state.store
        && let Err(e) = store.save(inputs)
    {
        warn!(error = %e, "could not save inputs");
    }
}
