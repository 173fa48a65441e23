//! End-to-end scenarios for `pcislot-core`, driven through a scripted
//! command runner and a temporary sysfs/VM configuration tree.


#[cfg(test)]
mod mapping;
#[cfg(test)]
mod slots;
