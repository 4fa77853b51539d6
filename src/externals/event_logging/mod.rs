use self::adapters::LogToTracingAdapter;

pub mod adapters;

pub struct EventLoggingModule {
    pub data_log_adapter: LogToTracingAdapter,
}

impl EventLoggingModule {
    pub fn initialize() -> Self {
        Self {
            data_log_adapter: LogToTracingAdapter::default(),
        }
    }
}
