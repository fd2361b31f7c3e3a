cfg_if::cfg_if! {
    if #[cfg(nightly)] {
        #[inline]
        pub fn likely(b: bool) -> bool {
            std::intrinsics::likely(b)
        }

        #[inline]
        pub fn unlikely(b: bool) -> bool {
            std::intrinsics::unlikely(b)
        }
    } else {
        #[inline]
        #[cold]
        const fn cold() {}

        /// hint that the test is almost always true
        #[inline]
        pub const fn likely(b: bool) -> bool {
            if !b {
                cold()
            }
            b
        }

        /// hint that the test is almost always false
        #[inline]
        pub const fn unlikely(b: bool) -> bool {
            if b {
                cold()
            }
            b
        }
    }
}
