// src/config/consts.rs

// Portal endpoints
pub const TARGET_LIST_URL: &str =
    "http://robonet.lcogt.net/cgi-bin/private/cgiwrap/robouser/spitzer_target_list.cgi";
pub const UPDATE_OBSERVERS_URL: &str =
    "http://robonet.lcogt.net/cgi-bin/private/cgiwrap/robouser/update_observer_list.cgi";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Target list page
pub const START_MARKER: &str = "START TARGET LIST";
pub const END_MARKER: &str = "END TARGET LIST";
pub const EMPTY_CELL: &str = "    "; // keeps columns lined up in the header annotations

// Naming
pub const EVENT_NUMBER_LEN: usize = 4;

// Observer update form fields
pub const ADD_OBSERVER_FIELD: &str = "ADD_OBSERVER";
pub const DEL_OBSERVER_FIELD: &str = "DEL_OBSERVER";

// Local store
pub const STORE_DIR: &str = ".store";
pub const HISTORY_FILE: &str = "target_history.txt";
pub const DEBUG_LOG_FILE: &str = "debug.log";
