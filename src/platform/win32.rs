//! Win32 hotkey backend and native window
//!
//! RegisterHotKey / GetMessageW for the listener, plus a plain top-level
//! window whose close and key-down messages are routed to the handlers
//! installed by the controller.

use std::cell::RefCell;
use std::ffi::c_void;
use std::rc::Rc;

use tracing::warn;
use windows::core::{w, HSTRING};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_NOREPEAT, VIRTUAL_KEY,
    VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, PeekMessageW,
    PostQuitMessage, RegisterClassW, SetForegroundWindow, ShowWindow, TranslateMessage,
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, MSG, PM_REMOVE, SW_HIDE, SW_SHOW, WINDOW_EX_STYLE,
    WM_CLOSE, WM_DESTROY, WM_HOTKEY, WM_KEYDOWN, WM_QUIT, WM_SYSKEYDOWN, WNDCLASSW,
    WS_OVERLAPPEDWINDOW,
};

use crate::host::{CloseHandler, HostWindow, KeyDown, KeyHandler, WindowHandle};
use crate::hotkey::{HotkeyBackend, HotkeyError, Key, KeyCombo};

fn to_hwnd(window: WindowHandle) -> Option<HWND> {
    (!window.is_null()).then(|| HWND(window.as_raw() as *mut c_void))
}

/// Hotkeys through `RegisterHotKey`, messages through the thread queue
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

impl HotkeyBackend for Win32Backend {
    type Message = MSG;

    fn check_platform(&self) -> Result<(), HotkeyError> {
        Ok(())
    }

    fn register_hotkey(&self, id: i32, combo: &KeyCombo, window: WindowHandle) -> Result<(), String> {
        // MOD_NOREPEAT keeps a held combo from firing again
        let modifiers = HOT_KEY_MODIFIERS(combo.modifiers().flags() | MOD_NOREPEAT.0);
        unsafe { RegisterHotKey(to_hwnd(window), id, modifiers, combo.key().vk_code()) }
            .map_err(|e| e.to_string())
    }

    fn unregister_hotkey(&self, id: i32, window: WindowHandle) -> Result<(), String> {
        unsafe { UnregisterHotKey(to_hwnd(window), id) }.map_err(|e| e.to_string())
    }

    fn next_message(&self) -> Option<MSG> {
        let mut msg = MSG::default();
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            0 => {
                // Hand WM_QUIT back to the outer pump so the host can exit too
                unsafe { PostQuitMessage(msg.wParam.0 as i32) };
                None
            }
            -1 => {
                warn!("GetMessageW failed, leaving listener loop");
                unsafe { PostQuitMessage(1) };
                None
            }
            _ => Some(msg),
        }
    }

    fn hotkey_id(&self, message: &MSG) -> Option<i32> {
        (message.message == WM_HOTKEY).then_some(message.wParam.0 as i32)
    }

    fn dispatch(&self, message: &MSG) {
        unsafe {
            let _ = TranslateMessage(message);
            DispatchMessageW(message);
        }
    }
}

/// Drain pending messages without blocking. Returns `false` on WM_QUIT.
pub fn pump_pending() -> bool {
    let mut msg = MSG::default();
    unsafe {
        while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
            if msg.message == WM_QUIT {
                return false;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    true
}

#[derive(Default)]
struct Handlers {
    close: Option<Rc<dyn Fn() -> bool>>,
    key: Option<Rc<dyn Fn(&KeyDown) -> bool>>,
}

thread_local! {
    static HANDLERS: RefCell<Handlers> = RefCell::new(Handlers::default());
}

/// A top-level window created hidden on the calling thread
pub struct NativeWindow {
    hwnd: HWND,
}

impl NativeWindow {
    pub fn create(title: &str, width: i32, height: i32) -> windows::core::Result<Self> {
        unsafe {
            let instance = GetModuleHandleW(None)?;
            let class_name = w!("HotkeyToggleWindow");

            let class = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: instance.into(),
                lpszClassName: class_name,
                ..Default::default()
            };
            RegisterClassW(&class);

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                class_name,
                &HSTRING::from(title),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                width,
                height,
                None,
                None,
                Some(instance.into()),
                None,
            )?;

            Ok(Self { hwnd })
        }
    }
}

impl HostWindow for NativeWindow {
    fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(self.hwnd.0 as isize)
    }

    fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
        }
    }

    fn hide(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn bring_to_front(&self) {
        unsafe {
            let _ = SetForegroundWindow(self.hwnd);
        }
    }

    fn set_close_handler(&self, handler: CloseHandler) {
        HANDLERS.with(|h| h.borrow_mut().close = Some(Rc::from(handler)));
    }

    fn set_key_handler(&self, handler: KeyHandler) {
        HANDLERS.with(|h| h.borrow_mut().key = Some(Rc::from(handler)));
    }

    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

fn is_down(key: VIRTUAL_KEY) -> bool {
    unsafe { GetKeyState(key.0 as i32) < 0 }
}

fn key_down_event(wparam: WPARAM) -> Option<KeyDown> {
    let key = Key::from_vk_code(wparam.0 as u32)?;

    let mut modifiers = Vec::new();
    for (vk, name) in [(VK_MENU, "alt"), (VK_CONTROL, "ctrl"), (VK_SHIFT, "shift")] {
        if is_down(vk) {
            modifiers.push(name);
        }
    }
    if is_down(VK_LWIN) || is_down(VK_RWIN) {
        modifiers.push("win");
    }

    Some(KeyDown::new(key.to_string(), modifiers))
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CLOSE => {
            // Handlers are cloned out so they may re-enter the window proc
            let handler = HANDLERS.with(|h| h.borrow().close.clone());
            if handler.is_some_and(|close| close()) {
                return LRESULT(0);
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_KEYDOWN | WM_SYSKEYDOWN => {
            if let Some(event) = key_down_event(wparam) {
                let handler = HANDLERS.with(|h| h.borrow().key.clone());
                if handler.is_some_and(|key| key(&event)) {
                    return LRESULT(0);
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
