mod clock;
mod console;
mod files;

pub use clock::{SysClock, sleep_frame};
pub use console::ConsoleInput;
pub use files::{FileHandle, FileTable, MAX_HANDLES, SysError, file_exists, make_dir};
