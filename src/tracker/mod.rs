pub(crate) mod step_tracker;
