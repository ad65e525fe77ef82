mod formatter;

pub use formatter::SummaryFormatter;
