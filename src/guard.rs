/// Keeps a busy flag raised while alive and lowers it on drop, whichever
/// way the owning operation exits (early return, error, or a dropped future).
pub struct FlagGuard<'a>(&'a mut bool);

impl<'a> FlagGuard<'a> {
    pub fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        FlagGuard(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
