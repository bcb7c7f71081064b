pub mod devfile;
pub mod web;
