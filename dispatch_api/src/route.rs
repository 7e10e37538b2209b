pub mod optimize_handler;
