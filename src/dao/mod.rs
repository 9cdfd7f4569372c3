pub mod covid;
