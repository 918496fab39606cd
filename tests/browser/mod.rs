mod capture_session;
mod constraints;
mod local_storage;
mod media_devices;
