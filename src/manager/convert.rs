//! Percent ↔ pixel conversion around another backend.
//!
//! Layouts are stored resolution-independently, so strategies speak percent
//! of the monitor work area: `(0, 0, 100, 100)` is the whole usable screen.
//! [`ConvertWindowManager`] translates every rect crossing it, using the
//! work area reported at the time of the call.

use crate::geometry::{Rect, Vector};
use crate::traits::{WindowHandle, WindowManager, WmError, WorkArea};
use log::trace;

/// Full extent of one axis in percent space.
pub const PERCENT: f64 = 100.0;

/// Express a pixel rect relative to a `size`-sized area at the origin as
/// percentages of that area.
pub fn pixel_to_percent(rect: Rect, size: Vector) -> Rect {
    rect.scale(PERCENT).shrink(size.x, size.y)
}

/// Inverse of [`pixel_to_percent`].
pub fn percent_to_pixel(rect: Rect, size: Vector) -> Rect {
    rect.extend(size.x, size.y).scale(1.0 / PERCENT)
}

/// A [`WindowManager`] that presents `inner`'s pixel rects as percent of
/// the work area reported by `area`.
pub struct ConvertWindowManager<W, A> {
    inner: W,
    area: A,
}

impl<W: WindowManager, A: WorkArea> ConvertWindowManager<W, A> {
    pub fn new(inner: W, area: A) -> Self {
        Self { inner, area }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// The current work area; rejects areas with no extent, which would
    /// make the conversion divide by zero.
    fn work_area(&self) -> Result<Rect, WmError> {
        let area = self.area.work_area()?;
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(WmError::Backend(format!("degenerate work area {:?}", area)));
        }
        Ok(area)
    }
}

impl<W: WindowManager, A: WorkArea> WindowManager for ConvertWindowManager<W, A> {
    fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
        self.inner.focused_window()
    }

    fn set_focused_window(&self, handle: WindowHandle) -> Result<(), WmError> {
        self.inner.set_focused_window(handle)
    }

    fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
        self.inner.visible_windows()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WmError> {
        let area = self.work_area()?;
        let px = self.inner.window_rect(handle)?;
        Ok(pixel_to_percent(px.translate(-area.origin()), area.size()))
    }

    fn position_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), WmError> {
        let area = self.work_area()?;
        let px = percent_to_pixel(rect, area.size()).translate(area.origin());
        trace!("{}: {:?}% -> {:?}px", handle, rect, px);
        self.inner.position_window(handle, px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::sandbox::SandboxWindowManager;

    #[test]
    fn pixel_percent_round_trip() {
        let size = Vector::new(1920.0, 1080.0);
        let rects = [
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
            Rect::new(13.0, 7.0, 971.0, 333.0),
            Rect::new(-20.0, 5.5, 2000.0, 1079.9),
        ];
        for r in rects {
            let back = percent_to_pixel(pixel_to_percent(r, size), size);
            assert!(back.approx_eq(&r, 1e-9), "{:?} != {:?}", back, r);
        }
    }

    #[test]
    fn half_screen_is_fifty_percent() {
        let p = pixel_to_percent(Rect::new(960.0, 0.0, 1920.0, 1080.0), Vector::new(1920.0, 1080.0));
        assert!(p.approx_eq(&Rect::new(50.0, 0.0, 100.0, 100.0), 1e-9));
    }

    #[test]
    fn reads_and_writes_through_offset_work_area() {
        // Second monitor at x=1920 with a 40px panel on top.
        let area = Rect::new(1920.0, 40.0, 3840.0, 1080.0);
        let sandbox = SandboxWindowManager::new();
        let h = sandbox.add_window(Rect::new(1920.0, 40.0, 2880.0, 560.0));
        let wm = ConvertWindowManager::new(sandbox, area);

        let pct = wm.window_rect(h).unwrap();
        assert!(pct.approx_eq(&Rect::new(0.0, 0.0, 50.0, 50.0), 1e-9));

        wm.position_window(h, Rect::new(50.0, 0.0, 100.0, 100.0)).unwrap();
        let px = wm.inner().window_rect(h).unwrap();
        assert!(px.approx_eq(&Rect::new(2880.0, 40.0, 3840.0, 1080.0), 1e-9));
    }

    #[test]
    fn degenerate_work_area_is_an_error() {
        let sandbox = SandboxWindowManager::new();
        let h = sandbox.add_window(Rect::new(0.0, 0.0, 10.0, 10.0));
        let wm = ConvertWindowManager::new(sandbox, Rect::new(0.0, 0.0, 0.0, 1080.0));
        assert!(matches!(wm.window_rect(h), Err(WmError::Backend(_))));
    }

    #[test]
    fn unknown_window_passes_not_found_through() {
        let wm = ConvertWindowManager::new(
            SandboxWindowManager::new(),
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
        );
        assert_eq!(
            wm.window_rect(WindowHandle(42)),
            Err(WmError::WindowNotFound(WindowHandle(42)))
        );
    }
}
