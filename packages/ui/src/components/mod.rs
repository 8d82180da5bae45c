//! Small styled building blocks shared by every view. Class names map to
//! rules in `assets/main.css`.

mod alert;
mod avatar;
mod button;
mod card;
mod input;
mod progress_bar;
mod tabs;

pub use alert::{Alert, AlertKind};
pub use avatar::Avatar;
pub use button::{Button, ButtonVariant};
pub use card::{Card, CardContent, CardHeader, StatCard};
pub use input::{Input, Label, Select};
pub use progress_bar::ProgressBar;
pub use tabs::Tabs;
