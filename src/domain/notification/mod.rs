pub mod notification_scheduler;
