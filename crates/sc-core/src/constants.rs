//! Global constants for sc-core

/// Suffix appended to the input file stem for the default output path
pub const OUTPUT_SUFFIX: &str = "_colored";

/// Extension of the default output path
pub const OUTPUT_EXTENSION: &str = "step";

/// Recognized STEP file extensions (compared case-insensitively)
pub const STEP_EXTENSIONS: [&str; 2] = ["stp", "step"];

/// Color counts offered by the desktop shell
pub const COLOR_COUNT_CHOICES: [u32; 4] = [5, 10, 15, 20];

/// Default palette size / gradient resolution
pub const DEFAULT_COLOR_COUNT: u32 = 10;

/// Progress milestones reported at pipeline transitions (percent)
pub const PROGRESS_LOADING: u8 = 10;
pub const PROGRESS_ORIENTING: u8 = 30;
pub const PROGRESS_COLORING: u8 = 50;
pub const PROGRESS_SAVING: u8 = 75;
pub const PROGRESS_DONE: u8 = 100;
