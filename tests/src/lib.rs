#![cfg(test)]

mod compose;
mod file_tag;
mod session;
mod support;
