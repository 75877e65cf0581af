use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::PathBuf;

use super::NativeError;
use crate::resolver::macos::{MacDomain, MacFolder, MacFolderApi};

const PATH_BUFFER_LEN: usize = 1024;

#[repr(C)]
struct FSRef {
    hidden: [u8; 80],
}

#[link(name = "CoreServices", kind = "framework")]
extern "C" {
    fn FSFindFolder(v_ref_num: i16, folder_type: u32, create_folder: u8, found_ref: *mut FSRef)
        -> i16;
    fn FSRefMakePath(fs_ref: *const FSRef, path: *mut u8, path_buffer_size: u32) -> i32;
}

/// Folder lookups through the CoreServices folder manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreServicesFolders;

impl MacFolderApi for CoreServicesFolders {
    fn find_folder(&self, folder: MacFolder, domain: MacDomain) -> Result<PathBuf, NativeError> {
        let mut fs_ref = FSRef { hidden: [0; 80] };
        // SAFETY: `fs_ref` is a valid, writable FSRef for the duration of the call.
        let status = unsafe { FSFindFolder(domain.code(), folder.type_code(), 0, &mut fs_ref) };
        if status != 0 {
            return Err(NativeError::new(
                i64::from(status),
                format!("FSFindFolder failed for {folder:?}"),
            ));
        }

        let mut buffer = [0u8; PATH_BUFFER_LEN];
        // SAFETY: the buffer length passed matches the allocation and the
        // folder manager NUL-terminates the result on success.
        let status = unsafe {
            FSRefMakePath(&fs_ref, buffer.as_mut_ptr(), PATH_BUFFER_LEN as u32)
        };
        if status != 0 {
            return Err(NativeError::new(
                i64::from(status),
                format!("FSRefMakePath failed for {folder:?}"),
            ));
        }

        // SAFETY: FSRefMakePath wrote a NUL-terminated UTF-8 string into `buffer`.
        let path = unsafe { CStr::from_ptr(buffer.as_ptr() as *const c_char) };
        Ok(PathBuf::from(path.to_string_lossy().into_owned()))
    }

    fn downloads_folder(&self) -> Result<PathBuf, NativeError> {
        dirs::download_dir().ok_or_else(|| NativeError::new(-1, "downloads folder not available"))
    }
}
