use std::collections::HashSet;

// In-flight markers for view operations. Raising one sets the flag and the
// Drop impl clears it, so an abandoned operation (dropped future) can never
// leave a control permanently disabled.
pub(crate) struct FlagGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> FlagGuard<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

// Same idea for per-target markers kept in a set.
pub(crate) struct SetGuard<'a> {
    set: &'a mut HashSet<String>,
    key: String,
}

impl<'a> SetGuard<'a> {
    pub(crate) fn insert(set: &'a mut HashSet<String>, key: &str) -> Self {
        set.insert(key.to_owned());
        Self {
            set,
            key: key.to_owned(),
        }
    }
}

impl Drop for SetGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}
