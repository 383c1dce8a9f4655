//! Test utilities for integration tests.
//!
//! This module provides a mock slide backend that serves synthetic
//! premultiplied ARGB pyramids and tracks how often it is opened, read and
//! closed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wsi_region::{Slide, SlideBackend, SlideError};

// =============================================================================
// Pixel Helpers
// =============================================================================

/// Pack a straight-alpha color into a premultiplied ARGB word.
pub fn premultiplied_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let pm = |c: u8| (u32::from(c) * u32::from(a) / 255) as u8;
    u32::from_be_bytes([a, pm(r), pm(g), pm(b)])
}

/// A pyramid level with its full pixel plane.
#[derive(Debug, Clone)]
pub struct MockLevel {
    pub width: i64,
    pub height: i64,
    pub downsample: f64,
    pub pixels: Vec<u32>,
}

impl MockLevel {
    /// Build a level whose pixels come from `f(x, y)`.
    pub fn from_fn(width: i64, height: i64, downsample: f64, f: impl Fn(i64, i64) -> u32) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            downsample,
            pixels,
        }
    }

    fn get(&self, x: i64, y: i64) -> u32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

/// A two-level pyramid: level 0 is 8x6, level 1 is 4x3.
///
/// Level 0 pixel `(x, y)` is straight `(x * 30, y * 40, 200)` with alpha 255
/// in the left half and 128 in the right half. Level 1 is opaque gray.
pub fn two_level_pyramid() -> Vec<MockLevel> {
    vec![
        MockLevel::from_fn(8, 6, 1.0, |x, y| {
            let a = if x < 4 { 255 } else { 128 };
            premultiplied_argb((x * 30) as u8, (y * 40) as u8, 200, a)
        }),
        MockLevel::from_fn(4, 3, 2.0, |_, _| premultiplied_argb(90, 90, 90, 255)),
    ]
}

// =============================================================================
// Mock Backend
// =============================================================================

/// Shared counters for one mock slide.
#[derive(Debug, Default)]
pub struct Counters {
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
    pub reads: AtomicUsize,
}

impl Counters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

/// A mock backend serving in-memory pyramid levels.
pub struct MockBackend {
    identifier: String,
    levels: Arc<Vec<MockLevel>>,
    read_failure: Option<String>,
    counters: Arc<Counters>,
}

impl SlideBackend for MockBackend {
    fn level_count(&self) -> i32 {
        self.levels.len() as i32
    }

    fn level_dimensions(&self, level: i32) -> (i64, i64) {
        let l = &self.levels[level as usize];
        (l.width, l.height)
    }

    fn level_downsample(&self, level: i32) -> f64 {
        self.levels[level as usize].downsample
    }

    fn read_region(
        &self,
        dest: &mut [u32],
        x: i64,
        y: i64,
        level: i32,
        width: i64,
        height: i64,
    ) -> Result<(), String> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);

        if let Some(ref message) = self.read_failure {
            return Err(message.clone());
        }

        assert_eq!(dest.len() as i64, width * height, "destination mis-sized");

        let l = &self.levels[level as usize];
        for row in 0..height {
            for col in 0..width {
                dest[(row * width + col) as usize] = l.get(x + col, y + row);
            }
        }
        Ok(())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Mock Slide Source
// =============================================================================

struct MockSlide {
    levels: Arc<Vec<MockLevel>>,
    read_failure: Option<String>,
    counters: Arc<Counters>,
}

/// A set of openable mock slides keyed by path.
#[derive(Default)]
pub struct MockSlideSource {
    slides: HashMap<PathBuf, MockSlide>,
}

impl MockSlideSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide at `path`.
    pub fn with_slide(mut self, path: impl Into<PathBuf>, levels: Vec<MockLevel>) -> Self {
        self.slides.insert(
            path.into(),
            MockSlide {
                levels: Arc::new(levels),
                read_failure: None,
                counters: Arc::new(Counters::default()),
            },
        );
        self
    }

    /// Add a slide whose reads always fail with `message`.
    pub fn with_failing_slide(
        mut self,
        path: impl Into<PathBuf>,
        levels: Vec<MockLevel>,
        message: &str,
    ) -> Self {
        self.slides.insert(
            path.into(),
            MockSlide {
                levels: Arc::new(levels),
                read_failure: Some(message.to_string()),
                counters: Arc::new(Counters::default()),
            },
        );
        self
    }

    /// Open a slide, failing like the native engine for unknown paths.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Slide<MockBackend>, SlideError> {
        let path = path.as_ref();
        let slide = self.slides.get(path).ok_or_else(|| SlideError::Open {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        })?;

        slide.counters.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Slide::from_backend(MockBackend {
            identifier: path.display().to_string(),
            levels: Arc::clone(&slide.levels),
            read_failure: slide.read_failure.clone(),
            counters: Arc::clone(&slide.counters),
        }))
    }

    /// Counters for the slide at `path`.
    pub fn counters(&self, path: impl AsRef<Path>) -> Arc<Counters> {
        Arc::clone(&self.slides[path.as_ref()].counters)
    }
}

/// A source with `sample.svs` (two levels) and `broken.svs` (failing reads).
pub fn sample_source() -> MockSlideSource {
    MockSlideSource::new()
        .with_slide("sample.svs", two_level_pyramid())
        .with_failing_slide("broken.svs", two_level_pyramid(), "corrupt tile")
}
