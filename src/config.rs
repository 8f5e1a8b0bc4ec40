use crate::consts::{LOG_LEVEL_FILTER_DEBUG, LOG_LEVEL_FILTER_RELEASE};
use log::LevelFilter;

#[derive(Debug, Clone, Copy)]
pub struct StripFoldConfig {
    /// Direction in which the surviving column is read when printed.
    pub read_order: ReadOrder,
    /// Blanket filter applied by the logger.
    /// See [`crate::util::io::init_logger`].
    pub log_level_filter: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadOrder {
    /// Start at the bottom of the stack (label 1) and walk upwards
    #[default]
    BottomUp,
    /// Start at the top of the stack and walk downwards to label 1
    TopDown,
}

pub const DEFAULT_STRIP_FOLD_CONFIG: StripFoldConfig = StripFoldConfig {
    read_order: ReadOrder::BottomUp,
    log_level_filter: match cfg!(debug_assertions) {
        true => LOG_LEVEL_FILTER_DEBUG,
        false => LOG_LEVEL_FILTER_RELEASE,
    },
};
