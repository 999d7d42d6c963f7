mod event;
mod scenario;
