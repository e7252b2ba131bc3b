mod files;
mod gaps;
