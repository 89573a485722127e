pub mod story_server;
