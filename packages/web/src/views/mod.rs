mod exercises;
pub use exercises::Exercises;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod protected_layout;
pub use protected_layout::ProtectedLayout;

mod settings;
pub use settings::Settings;
