/// Integration tests that run the application against real SQLite files
mod persistence;
mod workflow;
