pub mod favourites;
