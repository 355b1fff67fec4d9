pub mod like;
pub mod message_id;
