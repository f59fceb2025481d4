//! Engine module: CLI, digests, hex codec, database operations, tools

pub mod arg_parser;
pub mod cli;
pub mod db_ops;
pub mod hashing;
pub mod hex;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{apply_cli_to_opts, handle_run};
pub use db_ops::{
    DuplicateRow, duplicates, group_rows, load_record, lookup_exists, open_db, open_db_in_memory,
    record_count, upsert,
};
pub use hashing::{ChunkBuffer, DigestAlgorithm};
pub use tools::{
    format_mtime, human_size, index_file_paths, is_index_file, path_to_db_string,
};
