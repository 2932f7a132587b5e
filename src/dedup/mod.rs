pub(crate) mod retained;
