//! Screen region capture using GDI.

use anyhow::Result;
use image::{ImageBuffer, Rgba};

use crate::tracker::config::ScreenRect;

/// Captures a rectangle of the desktop as an RGBA image.
///
/// This function:
/// 1. Gets the screen device context
/// 2. Copies the region into a compatible bitmap with BitBlt
/// 3. Reads the bitmap back as top-down 32-bit BGRA rows
/// 4. Converts from BGRA to RGBA format
#[cfg(windows)]
pub fn capture_region(rect: &ScreenRect) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    use anyhow::anyhow;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::{
        BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
        GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
        DIB_RGB_COLORS, HGDIOBJ, SRCCOPY,
    };

    if rect.is_empty() {
        return Err(anyhow!("Capture region has zero size: {:?}", rect));
    }

    let width = i32::try_from(rect.width)?;
    let height = i32::try_from(rect.height)?;
    let mut bgra = vec![0u8; buffer_len(rect.width, rect.height)?];

    unsafe {
        let screen_dc = GetDC(HWND::default());
        if screen_dc.is_invalid() {
            return Err(anyhow!("Failed to get screen device context"));
        }

        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let previous = SelectObject(mem_dc, HGDIOBJ(bitmap.0));

        let blit = BitBlt(
            mem_dc,
            0,
            0,
            width,
            height,
            screen_dc,
            rect.x,
            rect.y,
            SRCCOPY,
        );

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // Negative height = top-down rows
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let lines = if blit.is_ok() {
            GetDIBits(
                mem_dc,
                bitmap,
                0,
                rect.height,
                Some(bgra.as_mut_ptr() as *mut _),
                &mut info,
                DIB_RGB_COLORS,
            )
        } else {
            0
        };

        let _ = SelectObject(mem_dc, previous);
        let _ = DeleteObject(HGDIOBJ(bitmap.0));
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(HWND::default(), screen_dc);

        blit.map_err(|e| anyhow!("BitBlt failed: {}", e))?;
        if lines != height {
            return Err(anyhow!("GetDIBits copied {} of {} rows", lines, height));
        }
    }

    Ok(bgra_to_image(rect.width, rect.height, &bgra))
}

#[cfg(not(windows))]
pub fn capture_region(rect: &ScreenRect) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    Err(anyhow::anyhow!(
        "Screen capture is only supported on Windows (region {:?})",
        rect
    ))
}

/// Size of the primary screen in pixels, if it can be determined.
#[cfg(windows)]
pub fn primary_screen_size() -> Option<(u32, u32)> {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let (w, h) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    if w > 0 && h > 0 {
        Some((w as u32, h as u32))
    } else {
        None
    }
}

#[cfg(not(windows))]
pub fn primary_screen_size() -> Option<(u32, u32)> {
    None
}

/// Opts the process into system DPI awareness so capture regions and
/// window positions are physical pixels rather than scaled ones.
#[cfg(windows)]
pub fn enable_dpi_awareness() {
    use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

    if !unsafe { SetProcessDPIAware() }.as_bool() {
        crate::log("Warning: SetProcessDPIAware failed; regions may be scaled");
    }
}

#[cfg(not(windows))]
pub fn enable_dpi_awareness() {}

/// Byte length of a tightly packed 32-bit pixel buffer.
#[cfg_attr(not(windows), allow(dead_code))]
fn buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| anyhow::anyhow!("Capture region {}x{} is too large", width, height))
}

/// Converts tightly packed BGRA rows into an RGBA image.
#[cfg_attr(not(windows), allow(dead_code))]
fn bgra_to_image(width: u32, height: u32, bgra: &[u8]) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let offset = (y as usize * width as usize + x as usize) * 4;
        // GDI leaves alpha at 0 for screen pixels
        Rgba([bgra[offset + 2], bgra[offset + 1], bgra[offset], 255])
    })
}
