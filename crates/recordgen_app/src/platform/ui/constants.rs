/// Lines above the first data row: column titles and the separator.
pub const HEADER_LINES: usize = 2;

pub const COL_NUMBER: usize = 5;
pub const COL_IDENTIFIER: usize = 38;
pub const COL_NAME: usize = 26;
pub const COL_ADDRESS: usize = 44;
pub const COL_PHONE: usize = 18;

pub const STATUS_LOADING: &str = "Loading more data...";
pub const STATUS_EXHAUSTED: &str = "No more data to load";

pub const HELP_TEXT: &str = "\
Commands:
  region <USA|Poland|Georgia>   select region
  errors <0-10>                 errors per record
  seed [text]                   set (or clear) the seed
  random                        generate a random seed
  scroll [lines]                scroll down (negative scrolls up)
  more                          load the next page
  export                        export rows to CSV
  show                          redraw the table
  help                          show this help
  quit                          exit";
