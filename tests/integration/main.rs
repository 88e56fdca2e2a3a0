//! Integration tests with mock HTTP server

mod http_transport;
mod mock_server;
