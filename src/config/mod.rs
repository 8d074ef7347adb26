pub mod genres;
pub mod settings;

pub use genres::default_genres;
