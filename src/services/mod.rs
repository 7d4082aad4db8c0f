pub mod disconnect;
pub mod handler_stats;
pub mod message_board;
pub mod request_id;
pub mod requester;
