use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::UNIX_EPOCH,
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, TimeDelta};
use rayon::prelude::*;

use crate::logging;

/// 預設單檔最大大小：10 MB
const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;
/// 預設保留天數：7 天
const DEFAULT_MAX_AGE_DAYS: i64 = 7;

/// Daily log file writer with size-based generations.
///
/// The file name comes from a `chrono` format pattern such as
/// `log/%Y-%m-%d-http.log`. When the formatted name changes (a new day) the
/// generation resets to zero; when a write would push the current file past
/// `max_size` the next generation (`name.1.log`, `name.2.log`, ...) is opened.
/// Generations only grow, older files are never overwritten.
pub struct Rotate {
    fn_pattern: String,
    /// 當前完整檔名（含 generation）
    cur_fn: String,
    /// 當前基礎檔名（不含 generation，由日期決定）
    cur_base_fn: String,
    out_fh: Option<BufWriter<File>>,
    generation: u32,
    max_size: u64,
    current_size: u64,
    max_age: TimeDelta,
}

impl Rotate {
    pub fn new(fn_pattern: String) -> Self {
        Self::with_options(fn_pattern, DEFAULT_MAX_SIZE, DEFAULT_MAX_AGE_DAYS)
    }

    pub fn with_options(fn_pattern: String, max_size: u64, max_age_days: i64) -> Self {
        Rotate {
            fn_pattern,
            cur_fn: String::new(),
            cur_base_fn: String::new(),
            out_fh: None,
            generation: 0,
            max_size,
            current_size: 0,
            max_age: TimeDelta::try_days(max_age_days).unwrap_or(TimeDelta::days(7)),
        }
    }

    /// 寫入日誌訊息，自動處理日期切換與大小輪轉
    pub fn write_msg(&mut self, now: DateTime<Local>, msg: &[u8]) -> Result<()> {
        let base_fn = now.format(&self.fn_pattern).to_string();

        if base_fn != self.cur_base_fn || self.out_fh.is_none() {
            self.generation = 0;
            self.cur_base_fn = base_fn;
            self.open_new_file()?;
            self.cleanup_old_files(now);
        }

        if self.current_size > 0 && self.current_size + msg.len() as u64 > self.max_size {
            self.generation += 1;
            self.open_new_file()?;
        }

        let writer = self
            .out_fh
            .as_mut()
            .ok_or_else(|| anyhow!("The log file {} is not open", self.cur_fn))?;
        writer.write_all(msg)?;
        self.current_size += msg.len() as u64;

        Ok(())
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.out_fh.as_mut() {
            let _ = writer.flush();
        }
    }

    /// generation = 0: "log/2025-02-03-app.log"
    /// generation = 2: "log/2025-02-03-app.2.log"
    fn generate_full_fn(base_fn: &str, generation: u32) -> String {
        if generation == 0 {
            return base_fn.to_string();
        }

        let path = Path::new(base_fn);
        let parent = path.parent().unwrap_or(Path::new(""));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("log");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("log");

        parent
            .join(format!("{}.{}.{}", stem, generation, ext))
            .to_string_lossy()
            .to_string()
    }

    fn open_new_file(&mut self) -> Result<()> {
        self.flush();

        let filename = Self::generate_full_fn(&self.cur_base_fn, self.generation);
        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&filename)?;
        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.out_fh = Some(BufWriter::with_capacity(4096, file));
        self.cur_fn = filename;

        Ok(())
    }

    /// 清理超過 max_age 的日誌檔
    fn cleanup_old_files(&self, now: DateTime<Local>) {
        let files = match Self::log_files_beside(&self.cur_fn) {
            Ok(files) => files,
            Err(why) => {
                logging::error_console(format!("Failed to list log files because {:?}", why));
                return;
            }
        };

        let cut_off = (now - self.max_age).timestamp().max(0) as u64;
        let expired: Vec<PathBuf> = files
            .into_iter()
            .filter(|file| {
                fs::metadata(file)
                    .and_then(|metadata| metadata.modified())
                    .ok()
                    .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
                    .is_some_and(|age| age.as_secs() <= cut_off)
            })
            .collect();

        expired
            .par_iter()
            .with_min_len(num_cpus::get())
            .for_each(|unlink| {
                if let Err(why) = fs::remove_file(unlink) {
                    logging::error_console(format!(
                        "couldn't remove the file({}). because {:?}",
                        unlink.display(),
                        why
                    ));
                }
            });
    }

    fn log_files_beside<P: AsRef<Path>>(file_path: P) -> Result<Vec<PathBuf>, io::Error> {
        let parent_dir = file_path
            .as_ref()
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Parent directory not found"))?;

        let mut files = Vec::new();
        for entry in fs::read_dir(parent_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "log") {
                files.push(path);
            }
        }

        Ok(files)
    }
}

impl Drop for Rotate {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "quote_crawler_rotate_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_generation_filename() {
        let base = "log/2025-02-03-app.log";
        assert_eq!(Rotate::generate_full_fn(base, 0), "log/2025-02-03-app.log");
        assert_eq!(Rotate::generate_full_fn(base, 1), "log/2025-02-03-app.1.log");
        assert_eq!(Rotate::generate_full_fn(base, 2), "log/2025-02-03-app.2.log");
    }

    #[test]
    fn test_size_rotation_never_overwrites() {
        let dir = scratch_dir("size");
        let pattern = dir.join("%Y-%m-%d-size.log").to_string_lossy().to_string();
        let mut r = Rotate::with_options(pattern, 512, 7);
        let now = Local::now();

        for i in 0..50 {
            let msg = format!("Line {:03} - {}\r\n", i, "X".repeat(50));
            r.write_msg(now, msg.as_bytes()).unwrap();
        }
        r.flush();

        assert!(r.generation >= 3, "generation: {}", r.generation);

        let files = fs::read_dir(&dir).unwrap().count() as u32;
        assert_eq!(files, r.generation + 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_date_change_resets_generation() {
        let dir = scratch_dir("date");
        let pattern = dir.join("%Y-%m-%d-date.log").to_string_lossy().to_string();
        let mut r = Rotate::with_options(pattern, 64, 7);
        let now = Local::now();

        r.write_msg(now, "X".repeat(60).as_bytes()).unwrap();
        r.write_msg(now, "X".repeat(60).as_bytes()).unwrap();
        assert_eq!(r.generation, 1);

        let tomorrow = now + TimeDelta::try_days(1).unwrap();
        r.write_msg(tomorrow, b"Day 2\r\n").unwrap();
        assert_eq!(r.generation, 0);
        assert!(r.cur_fn.contains(&tomorrow.format("%Y-%m-%d").to_string()));

        let _ = fs::remove_dir_all(&dir);
    }
}
