pub mod sync_reminders;
