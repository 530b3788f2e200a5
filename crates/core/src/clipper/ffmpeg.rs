//! FFmpeg-based clip extractor.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::config::ClipperConfig;
use super::error::ClipError;
use super::traits::ClipExtractor;
use super::types::{format_interval, ClipRequest};
use crate::library::{FileType, PathResolver};

/// Disambiguates clips requested within the same clock tick.
static CLIP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Clip extractor that shells out to ffmpeg.
pub struct FfmpegClipper {
    resolver: PathResolver,
    config: ClipperConfig,
}

impl FfmpegClipper {
    /// Creates a new clipper resolving sources through `resolver`.
    pub fn new(resolver: PathResolver, config: ClipperConfig) -> Self {
        Self { resolver, config }
    }

    /// Creates a clipper with default configuration.
    pub fn with_defaults(resolver: PathResolver) -> Self {
        Self::new(resolver, ClipperConfig::default())
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    /// Picks a fresh output path in the scratch directory.
    fn output_path(&self) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = CLIP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        self.config
            .temp_dir
            .join(format!("audio_{}_{}.mp3", nanos, seq))
    }

    /// Builds ffmpeg arguments for a clip of `source`.
    fn build_args(
        &self,
        source: &Path,
        output: &Path,
        file_type: FileType,
        request: &ClipRequest,
        duration_ms: i64,
    ) -> Vec<String> {
        let mut args = vec![
            "-ss".to_string(),
            format_interval(request.start_ms),
            "-t".to_string(),
            format_interval(duration_ms),
            "-i".to_string(),
            source.to_string_lossy().to_string(),
        ];

        if file_type == FileType::Audio {
            // Already MP3, copy the stream as is
            args.extend(["-acodec".to_string(), "copy".to_string()]);
        } else {
            if let Some(track) = request.track_id {
                args.extend(["-map".to_string(), format!("0:{}", track)]);
            }
            args.extend(
                ["-vn", "-ac", "2", "-ar", "44100", "-ab", "192k", "-f", "mp3"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }

        args.extend(self.config.extra_args.iter().cloned());

        args.push(output.to_string_lossy().to_string());

        args
    }

    /// Runs ffmpeg with the caller's stdout/stderr and waits for it to exit.
    async fn run_ffmpeg(&self, args: &[String]) -> Result<(), ClipError> {
        let status = Command::new(&self.config.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClipError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    ClipError::Io(e)
                }
            })?;

        if !status.success() {
            return Err(ClipError::TranscodeFailed {
                exit_code: status.code(),
            });
        }

        Ok(())
    }
}

/// Removes a clip output file, logging instead of failing.
async fn remove_output(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove clip output {:?}: {}", path, e);
        }
    }
}

#[async_trait]
impl ClipExtractor for FfmpegClipper {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn extract_clip(&self, request: &ClipRequest) -> Result<Vec<u8>, ClipError> {
        let start = Instant::now();
        let source = self.resolver.resolve(&request.source_path).await?;

        let file_type = match FileType::detect(&source).await? {
            Some(t) if t.is_media() => t,
            _ => return Err(ClipError::UnsupportedType { path: source }),
        };

        let invalid_range = || ClipError::InvalidRange {
            start_ms: request.start_ms,
            end_ms: request.end_ms,
        };
        let duration_ms = request.duration_ms().ok_or_else(invalid_range)?;
        if self.config.validate_range && duration_ms <= 0 {
            return Err(invalid_range());
        }

        tokio::fs::create_dir_all(&self.config.temp_dir).await?;
        let output = self.output_path();
        let args = self.build_args(&source, &output, file_type, request, duration_ms);
        debug!("Running {:?} {:?}", self.config.ffmpeg_path, args);

        if let Err(e) = self.run_ffmpeg(&args).await {
            remove_output(&output).await;
            return Err(e);
        }

        let bytes = tokio::fs::read(&output).await;
        remove_output(&output).await;
        let bytes = bytes?;

        info!(
            "Clipped {} [{} - {} ms] from {} source: {} bytes in {} ms",
            request.source_path,
            request.start_ms,
            request.end_ms,
            file_type,
            bytes.len(),
            start.elapsed().as_millis()
        );

        Ok(bytes)
    }

    async fn validate(&self) -> Result<(), ClipError> {
        let ffmpeg_result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match ffmpeg_result {
            Ok(output) if !output.status.success() => {
                return Err(ClipError::TranscodeFailed {
                    exit_code: output.status.code(),
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClipError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                });
            }
            Err(e) => return Err(ClipError::Io(e)),
        }

        // Ensure temp dir exists
        tokio::fs::create_dir_all(&self.config.temp_dir).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Writing a script while another test forks can leave it busy; spawn one at a time.
    static SPAWN_LOCK: Mutex<()> = Mutex::new(());

    struct Fixture {
        root: TempDir,
        scratch: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempfile::tempdir().unwrap();
            std::fs::write(root.path().join("song.mp3"), b"mp3").unwrap();
            std::fs::write(root.path().join("ep1.mkv"), b"mkv").unwrap();
            std::fs::write(root.path().join("ep1.ass"), b"ass").unwrap();
            Self {
                root,
                scratch: tempfile::tempdir().unwrap(),
            }
        }

        fn clipper(&self, ffmpeg_path: PathBuf) -> FfmpegClipper {
            FfmpegClipper::new(
                PathResolver::new(self.root.path()),
                ClipperConfig::with_ffmpeg_path(ffmpeg_path)
                    .with_temp_dir(self.scratch.path().join("clips")),
            )
        }

        fn scratch_files(&self) -> Vec<PathBuf> {
            match std::fs::read_dir(self.scratch.path().join("clips")) {
                Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
                Err(_) => Vec::new(),
            }
        }

        #[cfg(unix)]
        fn script(&self, name: &str, body: &str) -> PathBuf {
            use std::os::unix::fs::PermissionsExt;

            let path = self.scratch.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }
    }

    fn args_for(file_type: FileType, request: &ClipRequest) -> Vec<String> {
        let clipper = FfmpegClipper::with_defaults(PathResolver::new("/media"));
        clipper.build_args(
            Path::new("/media/input"),
            Path::new("/tmp/out.mp3"),
            file_type,
            request,
            request.duration_ms().unwrap(),
        )
    }

    #[test]
    fn test_build_args_audio_copies_stream() {
        let args = args_for(FileType::Audio, &ClipRequest::new("a.mp3", 1_000, 3_500));
        assert_eq!(
            args,
            vec![
                "-ss",
                "00:00:01.000",
                "-t",
                "00:00:02.500",
                "-i",
                "/media/input",
                "-acodec",
                "copy",
                "/tmp/out.mp3"
            ]
        );
    }

    #[test]
    fn test_build_args_video_reencodes() {
        let args = args_for(FileType::Video, &ClipRequest::new("a.mkv", 61_000, 62_000));
        assert_eq!(
            args,
            vec![
                "-ss",
                "00:01:01.000",
                "-t",
                "00:00:01.000",
                "-i",
                "/media/input",
                "-vn",
                "-ac",
                "2",
                "-ar",
                "44100",
                "-ab",
                "192k",
                "-f",
                "mp3",
                "/tmp/out.mp3"
            ]
        );
    }

    #[test]
    fn test_build_args_video_with_track() {
        let request = ClipRequest::new("a.mkv", 0, 500).with_track(3);
        let args = args_for(FileType::Video, &request);
        let map = args.iter().position(|a| a == "-map").unwrap();
        assert_eq!(args[map + 1], "0:3");
        assert!(map > args.iter().position(|a| a == "-i").unwrap());
        assert!(args.contains(&"192k".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn test_build_args_extra_args_before_output() {
        let mut config = ClipperConfig::default();
        config.extra_args = vec!["-loglevel".to_string(), "error".to_string()];
        let clipper = FfmpegClipper::new(PathResolver::new("/media"), config);
        let args = clipper.build_args(
            Path::new("/media/a.mp3"),
            Path::new("/tmp/out.mp3"),
            FileType::Audio,
            &ClipRequest::new("a.mp3", 0, 1),
            1,
        );
        let n = args.len();
        assert_eq!(&args[n - 3..], ["-loglevel", "error", "/tmp/out.mp3"]);
    }

    #[test]
    fn test_output_paths_are_unique() {
        let clipper = FfmpegClipper::with_defaults(PathResolver::new("/media"));
        let a = clipper.output_path();
        let b = clipper.output_path();
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "mp3");
        assert!(a.starts_with(&clipper.config().temp_dir));
    }

    #[tokio::test]
    async fn test_subtitle_source_is_unsupported_without_spawn() {
        let fixture = Fixture::new();
        // Spawning this binary would surface as FfmpegNotFound instead
        let clipper = fixture.clipper(PathBuf::from("/nonexistent/ffmpeg"));

        let err = clipper
            .extract_clip(&ClipRequest::new("ep1.ass", 0, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipError::UnsupportedType { .. }));
        assert!(fixture.scratch_files().is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let fixture = Fixture::new();
        let clipper = fixture.clipper(PathBuf::from("/nonexistent/ffmpeg"));

        let err = clipper
            .extract_clip(&ClipRequest::new("nope.mkv", 0, 1000))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_range_validation_rejects_inverted_range() {
        let fixture = Fixture::new();
        let mut clipper = fixture.clipper(PathBuf::from("/nonexistent/ffmpeg"));
        clipper.config.validate_range = true;

        let err = clipper
            .extract_clip(&ClipRequest::new("song.mp3", 2000, 1000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClipError::InvalidRange {
                start_ms: 2000,
                end_ms: 1000
            }
        ));
    }

    #[tokio::test]
    async fn test_overflowing_range_rejected_before_spawn() {
        let fixture = Fixture::new();
        let clipper = fixture.clipper(PathBuf::from("/nonexistent/ffmpeg"));

        let err = clipper
            .extract_clip(&ClipRequest::new("song.mp3", i64::MIN, 1000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClipError::InvalidRange {
                start_ms: i64::MIN,
                end_ms: 1000
            }
        ));
        assert!(fixture.scratch_files().is_empty());
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_binary() {
        let fixture = Fixture::new();
        let clipper = fixture.clipper(PathBuf::from("/nonexistent/ffmpeg"));

        let err = clipper
            .extract_clip(&ClipRequest::new("song.mp3", 0, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipError::FfmpegNotFound { .. }));
        assert!(clipper.validate().await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcode_failure_carries_exit_code() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = Fixture::new();
        let ffmpeg = fixture.script(
            "ffmpeg-fail",
            "for last; do :; done\nprintf 'partial' > \"$last\"\nexit 3",
        );
        let clipper = fixture.clipper(ffmpeg);

        let err = clipper
            .extract_clip(&ClipRequest::new("ep1.mkv", 0, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipError::TranscodeFailed { exit_code: Some(3) }));
        assert!(fixture.scratch_files().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_clip_returns_bytes_and_cleans_up() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let fixture = Fixture::new();
        let args_file = fixture.scratch.path().join("argv.txt");
        let ffmpeg = fixture.script(
            "ffmpeg-ok",
            &format!(
                "[ \"$1\" = \"-version\" ] && exit 0\nprintf '%s\\n' \"$@\" > '{}'\nfor last; do :; done\nprintf 'ID3clip' > \"$last\"",
                args_file.display()
            ),
        );
        let clipper = fixture.clipper(ffmpeg);

        let bytes = clipper
            .extract_clip(&ClipRequest::new("song.mp3", 1_500, 4_000))
            .await
            .unwrap();
        assert_eq!(bytes, b"ID3clip");
        assert!(fixture.scratch_files().is_empty());

        let argv = std::fs::read_to_string(&args_file).unwrap();
        let argv: Vec<&str> = argv.lines().collect();
        assert_eq!(&argv[..4], ["-ss", "00:00:01.500", "-t", "00:00:02.500"]);
        assert_eq!(argv[5], fixture.root.path().join("song.mp3").to_string_lossy());
        assert_eq!(&argv[6..8], ["-acodec", "copy"]);
        assert!(argv[8].ends_with(".mp3"));

        clipper.validate().await.unwrap();
    }
}
