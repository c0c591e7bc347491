mod date;
mod duration;
mod normalize;

pub use date::{DateFormatter, parse_published_at};
pub use duration::{coerce_duration, format_duration};
pub use normalize::{Episode, normalize, normalize_all};
