// handlers/mod.rs - HTTP handlers by route
//
// Public (no auth):     /health, /token
// Protected (token):    /book, /books, /book/:id

pub mod books;
pub mod health;
pub mod token;
