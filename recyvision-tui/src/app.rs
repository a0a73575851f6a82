use std::sync::Arc;

use chrono::NaiveDate;
use recyvision_core::{
    model::{RecyclingCenter, ScanEvent, ScanOutcome},
    service::RecyVisionService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Centers,
    Scan,
    History,
}

impl Screen {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Centers => Self::Scan,
            Self::Scan => Self::History,
            Self::History => Self::Centers,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<RecyVisionService>,

    pub screen: Screen,

    /// Free-text "lat lon city" input standing in for the device location.
    pub location_input: String,
    pub centers: Vec<RecyclingCenter>,
    pub center_list_index: usize,

    /// Path of the image to classify.
    pub image_input: String,
    pub outcome: Option<ScanOutcome>,
    /// Non-fatal notice from the last scan, e.g. a history write failure.
    pub scan_notice: Option<String>,

    /// Scan counts grouped per UTC day, newest first.
    pub history: Vec<(NaiveDate, usize)>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<RecyVisionService>) -> Self {
        Self {
            service,
            screen: Screen::Centers,
            location_input: String::new(),
            centers: Vec::new(),
            center_list_index: 0,
            image_input: String::new(),
            outcome: None,
            scan_notice: None,
            history: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn selected_center(&self) -> Option<&RecyclingCenter> {
        self.centers.get(self.center_list_index)
    }

    pub(crate) fn set_history(&mut self, events: &[ScanEvent]) {
        let mut per_day = std::collections::BTreeMap::<NaiveDate, usize>::new();
        for event in events {
            *per_day.entry(event.timestamp.date_naive()).or_default() += 1;
        }
        self.history = per_day.into_iter().rev().collect();
    }
}
