use super::{Screen, ScreenBody};
use crate::navigation::Route;

pub const LANDING_HEADING: &str = "Welcome to HNFC NeuroChaos";

pub fn render() -> Screen {
    Screen::new(
        Route::Landing,
        LANDING_HEADING,
        ScreenBody::Text {
            text: "Upload an EEG recording to compare per-channel metrics.".to_string(),
        },
    )
}
