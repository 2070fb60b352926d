//! The only module that talks to Win32: a borderless layered window with
//! color-key transparency, always on top, repositionable across displays.

use std::cell::RefCell;
use std::mem::size_of;

use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS, GetDC, ReleaseDC, SetDIBitsToDevice,
    UpdateWindow,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GWL_EXSTYLE, GetCursorPos, GetWindowLongPtrW, HWND_TOPMOST, IDC_ARROW, LWA_COLORKEY,
    LoadCursorW, MSG, PM_REMOVE, PeekMessageW, PostQuitMessage, RegisterClassExW,
    SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOOWNERZORDER, SWP_NOSENDCHANGING, SWP_SHOWWINDOW,
    SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos, ShowWindow, TranslateMessage,
    WM_DESTROY, WM_LBUTTONDOWN, WM_QUIT, WNDCLASSEXW, WS_EX_LAYERED,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::{PCWSTR, w};
use yomu_types::Geometry;

use crate::OverlayResult;
use crate::pixmap::Pixmap;

/// Same magenta as [`crate::render::KEY_COLOR`], in COLORREF (0x00BBGGRR)
const KEY_COLORREF: COLORREF = COLORREF(0x00FF00FF);

thread_local! {
    // Presses collected by the wndproc between pumps, window-local coords
    static PRESSES: RefCell<Vec<(i32, i32)>> = const { RefCell::new(Vec::new()) };
}

/// Input gathered by one message pump
pub struct PumpOutcome {
    pub presses: Vec<(i32, i32)>,
    pub quit: bool,
}

pub struct OverlayWindow {
    hwnd: HWND,
    geometry: Geometry,
    // Reused BGRA staging buffer for presentation
    scratch: Vec<u8>,
}

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("YomuOverlay");

    pub fn new(geometry: Geometry) -> OverlayResult<Self> {
        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let wc = WNDCLASSEXW {
                cbSize: size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };
            // May fail when the class already exists from a previous
            // show/hide round; creation below is what actually matters
            RegisterClassExW(&wc);

            let hwnd = CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE,
                Self::CLASS_NAME,
                w!("yomu overlay"),
                WS_POPUP,
                geometry.left,
                geometry.top,
                geometry.width,
                geometry.height,
                None,
                None,
                Some(hinstance),
                None,
            )?;

            SetLayeredWindowAttributes(hwnd, KEY_COLORREF, 0, LWA_COLORKEY)?;

            SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                geometry.left,
                geometry.top,
                geometry.width,
                geometry.height,
                SWP_NOACTIVATE | SWP_SHOWWINDOW | SWP_NOSENDCHANGING | SWP_NOOWNERZORDER,
            )?;

            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            let _ = UpdateWindow(hwnd);

            PRESSES.with(|p| p.borrow_mut().clear());

            Ok(Self {
                hwnd,
                geometry,
                scratch: Vec::new(),
            })
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Move/resize to another display's geometry on refresh
    pub fn reposition(&mut self, geometry: Geometry) -> OverlayResult<()> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                geometry.left,
                geometry.top,
                geometry.width,
                geometry.height,
                SWP_NOACTIVATE | SWP_SHOWWINDOW | SWP_NOSENDCHANGING | SWP_NOOWNERZORDER,
            )?;
        }
        self.geometry = geometry;
        Ok(())
    }

    /// Toggle WS_EX_TRANSPARENT: a click-through overlay lets input fall
    /// through to the windows underneath, at the price of hover/click
    pub fn set_click_through(&self, enabled: bool) {
        unsafe {
            let mut style = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE);
            if enabled {
                style |= WS_EX_TRANSPARENT.0 as isize;
            } else {
                style &= !(WS_EX_TRANSPARENT.0 as isize);
            }
            SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, style);
        }
    }

    /// Drain pending window messages, collecting presses since last pump
    pub fn pump(&self) -> PumpOutcome {
        let mut quit = false;
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    quit = true;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        let presses = PRESSES.with(|p| std::mem::take(&mut *p.borrow_mut()));
        PumpOutcome { presses, quit }
    }

    /// Pointer position in window-local coordinates, polled once per frame
    pub fn cursor_pos(&self) -> (i32, i32) {
        let mut point = POINT::default();
        unsafe {
            if GetCursorPos(&mut point).is_err() {
                return (-1, -1);
            }
        }
        (point.x - self.geometry.left, point.y - self.geometry.top)
    }

    /// Push the composed RGBA frame to the window
    pub fn present(&mut self, frame: &Pixmap) {
        let width = frame.width();
        let height = frame.height();
        let src = frame.data();

        self.scratch.resize(src.len(), 0);
        for (dst, px) in self.scratch.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            dst[0] = px[2];
            dst[1] = px[1];
            dst[2] = px[0];
            dst[3] = 255;
        }

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            bmiColors: [Default::default()],
        };

        unsafe {
            let hdc = GetDC(Some(self.hwnd));
            SetDIBitsToDevice(
                hdc,
                0,
                0,
                width as u32,
                height as u32,
                0,
                0,
                0,
                height as u32,
                self.scratch.as_ptr() as *const _,
                &bmi,
                DIB_RGB_COLORS,
            );
            ReleaseDC(Some(self.hwnd), hdc);
        }
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_LBUTTONDOWN => {
                let x = (lparam.0 & 0xFFFF) as i16 as i32;
                let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
                PRESSES.with(|p| p.borrow_mut().push((x, y)));
                LRESULT(0)
            }

            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                LRESULT(0)
            }

            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
