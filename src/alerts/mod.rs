pub mod alert;
pub mod dates;
pub mod view;

pub use alert::{Alert, AlertDraft, DraftError, Priority, StatusTone};
pub use dates::{day_offset, parse_clock_time, parse_flexible_date, relative_label, DayBucket};
pub use view::{build_view, distinct_categories, distinct_statuses, AlertView, AnnotatedAlert, FacetFilter, ViewQuery, ViewStats, ALL};
