use std::path::{Path, PathBuf};

use crate::Result;

use crate::config::Config;
use crate::generate::Post;
use crate::utils::sanitize_filename;

/// Default output filename for a platform, e.g. `LinkedIn_post.txt`
pub fn post_filename(platform: &str) -> String {
    format!("{}_post.txt", sanitize_filename(platform))
}

/// Default output path: configured output directory, or current directory
pub fn default_path(config: &Config, platform: &str) -> PathBuf {
    let filename = post_filename(platform);
    match &config.app.output_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

/// Save a post to a plain-text file
pub async fn save_to_file(post: &Post, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    fs_err::write(path, &post.content)?;
    Ok(())
}

/// Print a post to the console
pub fn print_to_console(post: &Post) {
    println!("{}", post.content);
}
