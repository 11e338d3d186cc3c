//! External deep links: Google Calendar events and OS timer URIs.
//!
//! Pure string construction around the engine's derived values. The
//! timer link depends on the platform, which is sniffed from a
//! user-agent string; platforms without a timer URI get no link.

use crate::catalog::catalog;
use crate::types::MedicineId;
use chrono::{DateTime, Duration, Local};

/// Platform detected from a user-agent string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Android,
    Windows,
    Ios,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("android") {
            Platform::Android
        } else if ua.contains("windows") {
            Platform::Windows
        } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

fn medicine_names(medicines: &[MedicineId]) -> String {
    medicines
        .iter()
        .map(|id| catalog().get(*id).name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Google Calendar template link for a 10-minute event at the next drop
/// time, titled with the due medicines.
pub fn google_calendar_link(next_drop: DateTime<Local>, medicines: &[MedicineId]) -> String {
    let text = format!("目薬: {}", medicine_names(medicines));
    let dates = next_drop.format("%Y%m%dT%H%M%S");
    let dates_end = (next_drop + Duration::minutes(10)).format("%Y%m%dT%H%M%S");

    format!(
        "https://www.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details=ICL点眼",
        urlencoding::encode(&text),
        dates,
        dates_end
    )
}

/// Platform-specific countdown-timer URI for the remaining seconds until
/// the next dose. Android gets a SET_TIMER intent, Windows the clock app;
/// other platforms have no timer URI.
pub fn timer_link(
    platform: Platform,
    remaining_secs: i64,
    medicines: &[MedicineId],
) -> Option<String> {
    match platform {
        Platform::Android => {
            let seconds = remaining_secs.max(0);
            let message = format!("目薬: {}", medicine_names(medicines));
            Some(format!(
                "intent:#Intent;action=android.intent.action.SET_TIMER;i.length={};S.android.intent.extra.MESSAGE={};B.SKIP_UI=true;end",
                seconds,
                urlencoding::encode(&message)
            ))
        }
        Platform::Windows => Some("ms-clock:timer".to_string()),
        Platform::Ios | Platform::Other => None,
    }
}
