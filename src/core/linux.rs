//! fbdev access through ioctl and a shared memory mapping

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use memmap2::{MmapMut, MmapOptions};

use crate::traits::{DeviceMemory, DeviceOpener, FixedScreenInfo, FramebufferDevice, VariableScreenInfo};

/// Opens `/dev/fbN` nodes read/write
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxOpener;

impl DeviceOpener for LinuxOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn FramebufferDevice>> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Box::new(LinuxFramebuffer { file }))
    }
}

/// An open fbdev node. The descriptor closes when this drops.
#[derive(Debug)]
pub struct LinuxFramebuffer {
    file: File,
}

impl FramebufferDevice for LinuxFramebuffer {
    fn fixed_info(&self) -> io::Result<FixedScreenInfo> {
        let info = sys::fixed_screen_info(&self.file)?;
        Ok(FixedScreenInfo {
            smem_len: info.smem_len,
            line_length: info.line_length,
        })
    }

    fn variable_info(&self) -> io::Result<VariableScreenInfo> {
        let info = sys::variable_screen_info(&self.file)?;
        Ok(VariableScreenInfo {
            xres: info.xres,
            yres: info.yres,
            bits_per_pixel: info.bits_per_pixel,
        })
    }

    fn map(&mut self, len: usize) -> io::Result<Box<dyn DeviceMemory>> {
        // SAFETY: the mapping is owned by the surface and only accessed through
        // bounds-checked slices; other processes writing the device can change
        // pixel values but not the mapping's size.
        let mmap = unsafe { MmapOptions::new().len(len).map_mut(&self.file)? };
        Ok(Box::new(mmap))
    }
}

impl DeviceMemory for MmapMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

#[cfg(target_os = "linux")]
mod sys {
    use std::fs::File;
    use std::io;
    use std::os::unix::io::AsRawFd;

    const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
    const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

    /// `struct fb_fix_screeninfo` from <linux/fb.h>
    #[allow(dead_code)]
    #[repr(C)]
    #[derive(Debug, Default)]
    pub struct FbFixScreeninfo {
        pub id: [u8; 16],
        pub smem_start: libc::c_ulong,
        pub smem_len: u32,
        pub type_: u32,
        pub type_aux: u32,
        pub visual: u32,
        pub xpanstep: u16,
        pub ypanstep: u16,
        pub ywrapstep: u16,
        pub line_length: u32,
        pub mmio_start: libc::c_ulong,
        pub mmio_len: u32,
        pub accel: u32,
        pub capabilities: u16,
        pub reserved: [u16; 2],
    }

    #[allow(dead_code)]
    #[repr(C)]
    #[derive(Debug, Default)]
    pub struct FbBitfield {
        pub offset: u32,
        pub length: u32,
        pub msb_right: u32,
    }

    /// `struct fb_var_screeninfo` from <linux/fb.h>
    #[allow(dead_code)]
    #[repr(C)]
    #[derive(Debug, Default)]
    pub struct FbVarScreeninfo {
        pub xres: u32,
        pub yres: u32,
        pub xres_virtual: u32,
        pub yres_virtual: u32,
        pub xoffset: u32,
        pub yoffset: u32,
        pub bits_per_pixel: u32,
        pub grayscale: u32,
        pub red: FbBitfield,
        pub green: FbBitfield,
        pub blue: FbBitfield,
        pub transp: FbBitfield,
        pub nonstd: u32,
        pub activate: u32,
        pub height: u32,
        pub width: u32,
        pub accel_flags: u32,
        pub pixclock: u32,
        pub left_margin: u32,
        pub right_margin: u32,
        pub upper_margin: u32,
        pub lower_margin: u32,
        pub hsync_len: u32,
        pub vsync_len: u32,
        pub sync: u32,
        pub vmode: u32,
        pub rotate: u32,
        pub colorspace: u32,
        pub reserved: [u32; 4],
    }

    pub fn fixed_screen_info(file: &File) -> io::Result<FbFixScreeninfo> {
        let mut info = FbFixScreeninfo::default();
        // SAFETY: `info` matches the kernel layout for this request and outlives the call.
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), FBIOGET_FSCREENINFO as _, &mut info as *mut FbFixScreeninfo) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(info)
    }

    pub fn variable_screen_info(file: &File) -> io::Result<FbVarScreeninfo> {
        let mut info = FbVarScreeninfo::default();
        // SAFETY: as above.
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), FBIOGET_VSCREENINFO as _, &mut info as *mut FbVarScreeninfo) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(info)
    }
}

#[cfg(not(target_os = "linux"))]
mod sys {
    use std::fs::File;
    use std::io;

    pub struct FbFixScreeninfo {
        pub smem_len: u32,
        pub line_length: u32,
    }

    pub struct FbVarScreeninfo {
        pub xres: u32,
        pub yres: u32,
        pub bits_per_pixel: u32,
    }

    fn unsupported() -> io::Error {
        io::Error::new(io::ErrorKind::Unsupported, "framebuffer devices are only supported on linux")
    }

    pub fn fixed_screen_info(_file: &File) -> io::Result<FbFixScreeninfo> {
        Err(unsupported())
    }

    pub fn variable_screen_info(_file: &File) -> io::Result<FbVarScreeninfo> {
        Err(unsupported())
    }
}
