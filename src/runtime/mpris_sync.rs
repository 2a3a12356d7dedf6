use crate::mpris::MprisHandle;
use crate::notify::NoticeLog;
use crate::player::PlaylistController;
use crate::transport::Transport;

pub fn update_mpris<T: Transport>(mpris: &MprisHandle, player: &PlaylistController<T, NoticeLog>) {
    mpris.set_track_metadata(player.current_index(), player.current_track());
    mpris.set_playback(player.status());
}
