mod helpers;
mod images;
mod mocks;
