pub(crate) mod bilateral;
pub(crate) mod blur;
pub(crate) mod colormap;
pub(crate) mod composite;
pub(crate) mod filters;
