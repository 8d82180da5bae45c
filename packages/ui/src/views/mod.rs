mod admin_dashboard;
pub use admin_dashboard::AdminDashboard;

mod child_dashboard;
pub use child_dashboard::{load_child_progress, ChildDashboard, ChildOverview};

mod dashboard;
pub use dashboard::{Dashboard, ExercisesView};

mod exercise_list;
pub use exercise_list::ExerciseList;

mod exercise_player;
pub use exercise_player::ExercisePlayer;

mod layout;
pub use layout::AppLayout;

mod login;
pub use login::LoginView;

mod parent_dashboard;
pub use parent_dashboard::ParentDashboard;

mod settings;
pub use settings::SettingsView;

mod therapist_dashboard;
pub use therapist_dashboard::TherapistDashboard;
