/// UI widget builders
///
/// Pure view code: functions that turn application state into iced
/// widget trees. No state lives here and nothing here does I/O.

pub mod file_list;
