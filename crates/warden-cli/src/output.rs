//! Terminal output helpers for `wrd`.

#![allow(clippy::print_stdout)]

use warden_common::types::{ContainerInfo, Tag};

/// Prints containers in a tabular format.
pub fn print_container_table(containers: &[ContainerInfo]) {
    if containers.is_empty() {
        println!("No containers found.");
        return;
    }
    println!("{:<32} {:<10} {:<16}", "TAG", "STATE", "EXIT");
    for info in containers {
        println!(
            "{:<32} {:<10} {:<16}",
            info.tag,
            info.state,
            info.exit_info
                .map_or_else(|| "-".to_owned(), |exit| exit.to_string())
        );
    }
}

/// Prints one tag per line.
pub fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("{tag}");
    }
}
