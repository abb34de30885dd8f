pub mod interpellation;
