//! System-dependent functions, or anything that this library is unable to
//! do without help from the OS.

use std::env;
use std::ffi::OsStr;
use std::path::Path;


#[cfg(any(target_os = "macos", target_os = "ios"))]
extern "C" {
    fn gettimeofday(tp: *mut libc::timeval, tzp: *mut libc::c_void) -> libc::c_int;
}


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) fn sys_time() -> (i64, i32) {
    use std::ptr::null_mut;

    let mut tv = libc::timeval { tv_sec: 0, tv_usec: 0 };
    let _ = unsafe { gettimeofday(&mut tv, null_mut()) };
    (i64::from(tv.tv_sec), tv.tv_usec as i32 * 1000)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
pub(crate) fn sys_time() -> (i64, i32) {
    let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let _ = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) };
    (i64::from(ts.tv_sec), ts.tv_nsec as i32)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(not(unix))]
pub(crate) fn sys_time() -> (i64, i32) {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d)  => (d.as_secs() as i64, d.subsec_nanos() as i32),
        Err(e) => {
            // before 1970
            let d = e.duration();
            let nanos = d.subsec_nanos() as i32;
            if nanos == 0 { (-(d.as_secs() as i64), 0) }
                     else { (-(d.as_secs() as i64) - 1, 1_000_000_000 - nanos) }
        }
    }
}

/// Attempts to determine the system’s current time zone. There’s no
/// guaranteed way to do this, so this function returns `None` if no
/// timezone could be found.
///
/// The `TZ` environment variable wins if it names a region; otherwise the
/// target of the `/etc/localtime` symlink is used.
pub(crate) fn sys_timezone() -> Option<String> {
    if let Ok(tz) = env::var("TZ") {
        let tz = tz.trim_start_matches(':');
        if ! tz.is_empty() && tz.split('/').all(|c| is_tz_component(OsStr::new(c))) {
            return Some(tz.to_owned());
        }
    }

    let link = std::fs::read_link("/etc/localtime").ok()?;
    extract_timezone(&link).filter(|tz| ! tz.is_empty())
}

/// Given a path, returns whether a valid zoneinfo timezone name can be
/// detected at the end of that path.
fn extract_timezone(path: &Path) -> Option<String> {
    let mut bits = Vec::new();

    for pathlet in path.iter().rev().take_while(|c| is_tz_component(c)) {
        bits.insert(0, pathlet.to_str()?);
    }

    Some(bits.join("/"))
}

/// Returns whether the input string could be used as a component of a
/// zoneinfo timezone name, which in this case is whether its first
/// character is a capital letter.
fn is_tz_component(component: &OsStr) -> bool {
    component.to_str()
             .and_then(|s| s.chars().next())
             .map_or(false, char::is_uppercase)
}


#[cfg(test)]
mod test {
    use super::{sys_time, extract_timezone};
    use std::path::Path;

    #[test]
    fn sanity_check() {
        let (secs, nanos) = sys_time();
        assert!(secs > 1_500_000_000);
        assert!((0 .. 1_000_000_000).contains(&nanos));
    }

    #[test]
    fn two() {
        let timezone = extract_timezone(Path::new("/usr/share/zoneinfo/Europe/London"));
        assert_eq!(timezone, Some("Europe/London".to_string()));
    }

    #[test]
    fn one() {
        let timezone = extract_timezone(Path::new("/usr/share/zoneinfo/CST6CDT"));
        assert_eq!(timezone, Some("CST6CDT".to_string()));
    }

    #[test]
    fn none() {
        let timezone = extract_timezone(Path::new("/usr/share/zoneinfo/"));
        assert_eq!(timezone, Some(String::new()));
    }
}
