use yomu_types::TextRegion;

/// Per-frame opacity step while a tooltip fades in
pub const TOOLTIP_FADE_IN_STEP: u8 = 15;
/// Per-frame opacity step while it fades out; faster than fade-in so a
/// pointer briefly leaving a region does not leave a lingering ghost,
/// while entry stays smooth
pub const TOOLTIP_FADE_OUT_STEP: u8 = 20;

/// Input gathered for one frame: polled pointer position plus the press
/// positions collected since the previous frame, all window-local
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub pointer: (i32, i32),
    pub presses: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Default)]
pub struct TooltipState {
    pub alpha: u8,
    pub text: String,
    pub pos: (i32, i32),
}

impl TooltipState {
    pub fn visible(&self) -> bool {
        self.alpha > 0 && !self.text.is_empty()
    }
}

/// The overlay's session state: the displayed regions and everything derived
/// from input — hover, click, tooltip fade.
///
/// Owned and mutated exclusively by the frame loop; the rest of the process
/// only ever replaces the region list wholesale via a command. `hovered` and
/// `clicked` are indices into `regions` and are reset on every replacement
/// because the old rectangle identities are gone.
pub struct SessionState {
    regions: Vec<TextRegion>,
    hovered: Option<usize>,
    clicked: Option<usize>,
    tooltip: TooltipState,
}

impl SessionState {
    pub fn new(regions: Vec<TextRegion>) -> Self {
        Self {
            regions,
            hovered: None,
            clicked: None,
            tooltip: TooltipState::default(),
        }
    }

    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn clicked(&self) -> Option<usize> {
        self.clicked
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Translation of the clicked region, if it has one
    pub fn clicked_translation(&self) -> Option<&str> {
        let i = self.clicked?;
        self.regions[i]
            .translation
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Atomically swap in a new region list; old hover/click indices are
    /// invalid against it and reset
    pub fn replace_regions(&mut self, regions: Vec<TextRegion>) {
        self.regions = regions;
        self.hovered = None;
        self.clicked = None;
    }

    /// First region (in list order) whose derived bounding rect contains the
    /// point. First-match-wins is the deliberate tie-break for overlaps;
    /// degenerate rects never match.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.quad.bounding_rect().contains(x, y))
    }

    /// Advance the state machine by one frame.
    ///
    /// `place` computes a tooltip position from its text and the pointer;
    /// the caller supplies it because placement needs font metrics and
    /// display bounds this state does not know about.
    pub fn advance(&mut self, input: &FrameInput, place: impl Fn(&str, (i32, i32)) -> (i32, i32)) {
        // Presses first: click is independent of hover
        for &(px, py) in &input.presses {
            if let Some(i) = self.hit_test(px, py) {
                self.clicked = if self.clicked == Some(i) {
                    None
                } else {
                    Some(i)
                };
            }
        }

        let (mx, my) = input.pointer;
        self.hovered = self.hit_test(mx, my);

        let hovered_translation = self.hovered.and_then(|i| {
            self.regions[i]
                .translation
                .as_deref()
                .filter(|t| !t.is_empty())
        });

        match hovered_translation {
            Some(tx) => {
                if self.tooltip.text != tx {
                    self.tooltip.text = tx.to_string();
                }
                self.tooltip.pos = place(&self.tooltip.text, input.pointer);
                self.tooltip.alpha = self.tooltip.alpha.saturating_add(TOOLTIP_FADE_IN_STEP);
            }
            None => {
                self.tooltip.alpha = self.tooltip.alpha.saturating_sub(TOOLTIP_FADE_OUT_STEP);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yomu_types::Quad;

    fn region(x: f32, y: f32, w: f32, h: f32, translation: Option<&str>) -> TextRegion {
        let mut r = TextRegion::new(Quad::from_rect(x, y, w, h), "テキスト", 0.9);
        r.translation = translation.map(str::to_string);
        r
    }

    fn fixed_place(_: &str, _: (i32, i32)) -> (i32, i32) {
        (0, 0)
    }

    #[test]
    fn replace_regions_resets_hover_and_click() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 100.0, 100.0, Some("hi"))]);
        s.advance(
            &FrameInput {
                pointer: (50, 50),
                presses: vec![(50, 50)],
            },
            fixed_place,
        );
        assert_eq!(s.hovered(), Some(0));
        assert_eq!(s.clicked(), Some(0));

        let new = vec![
            region(0.0, 0.0, 10.0, 10.0, None),
            region(20.0, 0.0, 10.0, 10.0, None),
            region(40.0, 0.0, 10.0, 10.0, None),
        ];
        s.replace_regions(new);
        assert_eq!(s.region_count(), 3);
        assert_eq!(s.hovered(), None);
        assert_eq!(s.clicked(), None);
    }

    #[test]
    fn overlapping_regions_resolve_to_first_listed() {
        let s = SessionState::new(vec![
            region(0.0, 0.0, 100.0, 100.0, None),
            region(0.0, 0.0, 100.0, 100.0, None),
        ]);
        assert_eq!(s.hit_test(50, 50), Some(0));
    }

    #[test]
    fn degenerate_region_never_matches() {
        let s = SessionState::new(vec![region(10.0, 10.0, 0.0, 50.0, None)]);
        assert_eq!(s.hit_test(10, 10), None);
        assert_eq!(s.hit_test(10, 30), None);
    }

    #[test]
    fn hover_tracks_pointer_within_one_frame() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 100.0, 100.0, Some("Hello"))]);
        s.advance(
            &FrameInput {
                pointer: (50, 50),
                presses: vec![],
            },
            fixed_place,
        );
        assert_eq!(s.hovered(), Some(0));

        s.advance(
            &FrameInput {
                pointer: (500, 500),
                presses: vec![],
            },
            fixed_place,
        );
        assert_eq!(s.hovered(), None);
    }

    #[test]
    fn click_toggles_same_region_and_replaces_other() {
        let mut s = SessionState::new(vec![
            region(0.0, 0.0, 10.0, 10.0, Some("a")),
            region(20.0, 0.0, 10.0, 10.0, Some("b")),
        ]);

        let press = |x, y| FrameInput {
            pointer: (500, 500),
            presses: vec![(x, y)],
        };

        s.advance(&press(5, 5), fixed_place);
        assert_eq!(s.clicked(), Some(0));

        s.advance(&press(25, 5), fixed_place);
        assert_eq!(s.clicked(), Some(1));

        s.advance(&press(25, 5), fixed_place);
        assert_eq!(s.clicked(), None);
    }

    #[test]
    fn press_outside_any_region_leaves_click_alone() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 10.0, 10.0, Some("a"))]);
        s.advance(
            &FrameInput {
                pointer: (500, 500),
                presses: vec![(5, 5)],
            },
            fixed_place,
        );
        assert_eq!(s.clicked(), Some(0));

        s.advance(
            &FrameInput {
                pointer: (500, 500),
                presses: vec![(300, 300)],
            },
            fixed_place,
        );
        assert_eq!(s.clicked(), Some(0));
    }

    #[test]
    fn tooltip_fades_in_while_hovered_and_out_faster_after() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 100.0, 100.0, Some("Hello"))]);
        let inside = FrameInput {
            pointer: (50, 50),
            presses: vec![],
        };
        let outside = FrameInput {
            pointer: (500, 500),
            presses: vec![],
        };

        s.advance(&inside, fixed_place);
        assert_eq!(s.tooltip().alpha, TOOLTIP_FADE_IN_STEP);
        assert_eq!(s.tooltip().text, "Hello");

        s.advance(&inside, fixed_place);
        assert_eq!(s.tooltip().alpha, 2 * TOOLTIP_FADE_IN_STEP);

        s.advance(&outside, fixed_place);
        assert_eq!(
            s.tooltip().alpha,
            2 * TOOLTIP_FADE_IN_STEP - TOOLTIP_FADE_OUT_STEP
        );
        // Text is kept while fading so the ghost can still be drawn
        assert_eq!(s.tooltip().text, "Hello");
    }

    #[test]
    fn tooltip_alpha_saturates_at_both_ends() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 100.0, 100.0, Some("Hello"))]);
        let inside = FrameInput {
            pointer: (50, 50),
            presses: vec![],
        };
        let outside = FrameInput {
            pointer: (500, 500),
            presses: vec![],
        };

        for _ in 0..40 {
            s.advance(&inside, fixed_place);
        }
        assert_eq!(s.tooltip().alpha, 255);

        for _ in 0..40 {
            s.advance(&outside, fixed_place);
        }
        assert_eq!(s.tooltip().alpha, 0);
        assert!(!s.tooltip().visible());
    }

    #[test]
    fn region_without_translation_shows_no_tooltip() {
        let mut s = SessionState::new(vec![region(0.0, 0.0, 100.0, 100.0, None)]);
        s.advance(
            &FrameInput {
                pointer: (50, 50),
                presses: vec![],
            },
            fixed_place,
        );
        assert_eq!(s.hovered(), Some(0));
        assert_eq!(s.tooltip().alpha, 0);
        assert!(!s.tooltip().visible());
    }
}
