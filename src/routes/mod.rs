pub mod academics;

pub mod assignments;

pub mod classes;

pub mod contacts;

pub mod dashboard;

pub mod students;

pub mod users;

pub use academics::configure_academics_routes;
pub use assignments::configure_assignments_routes;
pub use classes::configure_classes_routes;
pub use contacts::configure_contacts_routes;
pub use dashboard::configure_dashboard_routes;
pub use students::configure_students_routes;
pub use users::configure_user_routes;
