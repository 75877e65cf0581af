use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use std::ptr;

use windows_sys::Win32::System::Com::CoTaskMemFree;
use windows_sys::Win32::UI::Shell::{FOLDERID_Downloads, SHGetFolderPathW, SHGetKnownFolderPath};

use super::NativeError;
use crate::resolver::windows::{WinFolder, WinFolderApi};

const MAX_PATH: usize = 260;

/// Folder lookups through the shell folder APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellFolders;

impl WinFolderApi for ShellFolders {
    fn folder_path(&self, folder: WinFolder) -> Result<PathBuf, NativeError> {
        let mut buffer = [0u16; MAX_PATH];
        // SAFETY: `buffer` holds MAX_PATH wide characters as SHGetFolderPathW requires.
        let status = unsafe {
            SHGetFolderPathW(
                ptr::null_mut(),
                folder.csidl(),
                ptr::null_mut(),
                0,
                buffer.as_mut_ptr(),
            )
        };
        if status != 0 {
            return Err(NativeError::new(
                i64::from(status),
                format!("SHGetFolderPathW failed for {folder:?} with HRESULT {status:#010x}"),
            ));
        }
        Ok(from_wide_nul(&buffer))
    }

    fn downloads_folder(&self) -> Result<PathBuf, NativeError> {
        let mut raw: *mut u16 = ptr::null_mut();
        // SAFETY: `raw` receives a CoTaskMemAlloc'd string which is freed below
        // whether or not the call succeeded.
        let status =
            unsafe { SHGetKnownFolderPath(&FOLDERID_Downloads, 0, ptr::null_mut(), &mut raw) };
        let result = if status == 0 && !raw.is_null() {
            // SAFETY: on success `raw` points to a NUL-terminated wide string.
            let len = unsafe { (0..).take_while(|&i| *raw.add(i) != 0).count() };
            // SAFETY: `len` characters were just verified to be readable.
            let wide = unsafe { std::slice::from_raw_parts(raw, len) };
            Ok(PathBuf::from(OsString::from_wide(wide)))
        } else {
            Err(NativeError::new(
                i64::from(status),
                format!("SHGetKnownFolderPath failed for Downloads with HRESULT {status:#010x}"),
            ))
        };
        // SAFETY: freeing a null pointer is a no-op.
        unsafe { CoTaskMemFree(raw as *const _) };
        result
    }
}

fn from_wide_nul(buffer: &[u16]) -> PathBuf {
    let len = buffer
        .iter()
        .position(|&unit| unit == 0)
        .unwrap_or(buffer.len());
    PathBuf::from(OsString::from_wide(&buffer[..len]))
}
