pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use output::{banner, detail, error, is_quiet, magnitude_range, step, success, warn};
pub use progress::Spinner;
pub use table::{TableSummary, summary_table};
pub use theme::{Theme, theme};

pub struct Icons;

impl Icons {
    pub const TELESCOPE: &str = "🔭";
    pub const GEAR: &str = "⚙️";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
}
